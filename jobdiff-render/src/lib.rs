//! Rendering helpers (HTML) for the job report.
//!
//! The page uses jQuery Mobile collapsibles: one top-level collapsible per section, one nested
//! collapsible per job. Every piece of job-derived text goes through [`escape_html`].

use jobdiff_types::{JobReport, ReportSection};

pub const DEFAULT_TITLE: &str = "Config Visualizer";

pub const JQUERY_MOBILE_CSS: &str = "https://code.jquery.com/mobile/1.4.5/jquery.mobile-1.4.5.min.css";
pub const JQUERY_JS: &str = "https://code.jquery.com/jquery-1.11.3.min.js";
pub const JQUERY_MOBILE_JS: &str = "https://code.jquery.com/mobile/1.4.5/jquery.mobile-1.4.5.min.js";

#[derive(Debug, Clone)]
pub struct HtmlOptions {
    /// Page header text.
    pub title: String,
}

impl Default for HtmlOptions {
    fn default() -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
        }
    }
}

pub fn render_report_html(report: &JobReport, opts: &HtmlOptions) -> String {
    let mut out = String::new();
    out.push_str("<!DOCTYPE html>\n<html>\n<head>\n");
    out.push_str("<meta charset=\"utf-8\">\n");
    out.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
    out.push_str(&format!("<title>{}</title>\n", escape_html(&opts.title)));
    out.push_str(&format!(
        "<link rel=\"stylesheet\" href=\"{}\">\n",
        JQUERY_MOBILE_CSS
    ));
    out.push_str(&format!("<script src=\"{}\"></script>\n", JQUERY_JS));
    out.push_str(&format!("<script src=\"{}\"></script>\n", JQUERY_MOBILE_JS));
    out.push_str("</head>\n<body>\n\n");

    out.push_str("<div data-role=\"page\" id=\"pageone\">\n");
    out.push_str("  <div data-role=\"header\">\n");
    out.push_str(&format!("    <h1>{}</h1>\n", escape_html(&opts.title)));
    out.push_str("  </div>\n\n");

    out.push_str("  <div data-role=\"main\" class=\"ui-content\">\n");
    push_section(&mut out, "Flow Jobs", &report.flow);
    out.push('\n');
    push_section(&mut out, "Non Flow Jobs", &report.regular);
    out.push_str("  </div>\n\n");

    out.push_str("</div>\n\n</body>\n</html>\n");
    out
}

fn push_section(out: &mut String, heading: &str, section: &ReportSection) {
    out.push_str("    <div data-role=\"collapsible\">\n");
    out.push_str(&format!("    <h4>{} ({})</h4>\n", heading, section.len()));
    out.push_str("    <ul data-role=\"listview\">\n");
    for entry in &section.entries {
        out.push_str("      <li>\n");
        out.push_str("        <div data-role=\"collapsible\">\n");
        out.push_str(&format!("          <h4>{}</h4>\n", escape_html(&entry.label())));
        out.push_str("          <ul data-role=\"listview\">\n");
        out.push_str(&format!(
            "            <li><pre>{}</pre></li>\n",
            escape_html(&entry.body)
        ));
        out.push_str("          </ul>\n");
        out.push_str("        </div>\n");
        out.push_str("      </li>\n");
    }
    out.push_str("    </ul>\n");
    out.push_str("    </div>\n");
}

/// Escape text for element content and double- or single-quoted attribute values.
pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn escape_covers_markup_characters() {
        assert_eq!(
            escape_html(r#"<a href="x">'b' & c</a>"#),
            "&lt;a href=&quot;x&quot;&gt;&#39;b&#39; &amp; c&lt;/a&gt;"
        );
    }

    #[test]
    fn escape_leaves_plain_text() {
        assert_eq!(escape_html("make -j4 all"), "make -j4 all");
        assert_eq!(escape_html(""), "");
    }

    #[test]
    fn existing_entities_are_escaped_again() {
        assert_eq!(escape_html("&lt;"), "&amp;lt;");
    }
}
