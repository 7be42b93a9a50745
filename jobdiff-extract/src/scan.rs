use crate::error::MarkerError;
use jobdiff_types::JobBody;

const DSL_OPEN: &str = "<dsl>";
const DSL_CLOSE: &str = "</dsl>";
const COMMAND_OPEN: &str = "<command>";
const COMMAND_CLOSE: &str = "</command>";

/// Extract the build steps (or the DSL body of a flow job) from one document.
///
/// A document containing `<dsl>` is a flow job, even if it also has `<command>` regions.
/// Every extracted value is trimmed. A document with neither marker is a job with no steps.
pub fn extract_steps(text: &str) -> Result<JobBody, MarkerError> {
    match text.find(DSL_OPEN) {
        Some(open) => extract_dsl(text, open).map(JobBody::Flow),
        None => {
            if let Some(stray) = text.find(DSL_CLOSE) {
                return Err(MarkerError::StrayDslClose {
                    line: line_of(text, stray),
                });
            }
            extract_commands(text).map(JobBody::Steps)
        }
    }
}

fn extract_dsl(text: &str, open: usize) -> Result<String, MarkerError> {
    if let Some(close) = text[..open].find(DSL_CLOSE) {
        return Err(MarkerError::StrayDslClose {
            line: line_of(text, close),
        });
    }

    let body_start = open + DSL_OPEN.len();
    let Some(close) = text[body_start..].find(DSL_CLOSE).map(|c| body_start + c) else {
        return Err(MarkerError::UnclosedDsl {
            line: line_of(text, open),
        });
    };

    let body = &text[body_start..close];
    if let Some(nested) = body.find(DSL_OPEN) {
        return Err(MarkerError::DuplicateDsl {
            line: line_of(text, body_start + nested),
        });
    }

    let tail_start = close + DSL_CLOSE.len();
    let tail = &text[tail_start..];
    if let Some(again) = tail.find(DSL_OPEN) {
        return Err(MarkerError::DuplicateDsl {
            line: line_of(text, tail_start + again),
        });
    }
    if let Some(stray) = tail.find(DSL_CLOSE) {
        return Err(MarkerError::StrayDslClose {
            line: line_of(text, tail_start + stray),
        });
    }

    Ok(body.trim().to_string())
}

fn extract_commands(text: &str) -> Result<Vec<String>, MarkerError> {
    let mut steps = Vec::new();
    let mut cursor = 0;

    loop {
        let rest = &text[cursor..];
        let open = rest.find(COMMAND_OPEN).map(|o| cursor + o);
        let close = rest.find(COMMAND_CLOSE).map(|c| cursor + c);

        let open = match (open, close) {
            (None, None) => break,
            (None, Some(close)) => {
                return Err(MarkerError::StrayCommandClose {
                    line: line_of(text, close),
                });
            }
            (Some(open), Some(close)) if close < open => {
                return Err(MarkerError::StrayCommandClose {
                    line: line_of(text, close),
                });
            }
            (Some(open), _) => open,
        };

        let body_start = open + COMMAND_OPEN.len();
        let unclosed = || MarkerError::UnclosedCommand {
            line: line_of(text, open),
        };
        let close = text[body_start..]
            .find(COMMAND_CLOSE)
            .map(|c| body_start + c)
            .ok_or_else(unclosed)?;

        let body = &text[body_start..close];
        if body.contains(COMMAND_OPEN) {
            return Err(unclosed());
        }

        steps.push(body.trim().to_string());
        cursor = close + COMMAND_CLOSE.len();
    }

    Ok(steps)
}

fn line_of(text: &str, offset: usize) -> usize {
    text.as_bytes()[..offset]
        .iter()
        .filter(|b| **b == b'\n')
        .count()
        + 1
}
