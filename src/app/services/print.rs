use std::fs;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::app::controllers::form::{FormController, SignatureBlock};
use crate::app::domain::form::{DOCUMENT_SECTIONS, FieldId, SIGNER_SECTION};
use crate::app::infrastructure::error::Result;

const DOCUMENT_TITLE: &str = "Call-Off Contract";

const PRINT_CSS: &str = "\
body { font-family: Helvetica, Arial, sans-serif; margin: 2em; color: #222; }
h1 { font-size: 1.6em; border-bottom: 2px solid #333; padding-bottom: .3em; }
h2 { font-size: 1.1em; margin-top: 1.6em; text-transform: uppercase; }
dt { font-weight: bold; margin-top: .6em; }
dd { margin: .2em 0 0 0; }
.multiline { white-space: pre-wrap; }
.signature { border: 1px solid #999; padding: 1em; max-width: 420px; margin-top: 1em; }
.signature img { max-height: 60px; }
.unsigned { color: #a00; font-style: italic; }
@media print { body { margin: 0; } .signature { page-break-inside: avoid; } }
";

pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

fn field_text(form: &FormController, id: FieldId) -> String {
    match form.signed_document().and_then(|doc| doc.field(id)) {
        Some(frozen) => frozen.text.clone(),
        None => form.field(id).display_value().to_string(),
    }
}

fn render_signature(block: &SignatureBlock) -> String {
    format!(
        "<div class=\"signature\">\n\
         <dt>Name</dt><dd>{name}</dd>\n\
         <dd>{position}</dd>\n\
         <dt>Signature</dt><dd><img src=\"{src}\" alt=\"{name} Signature\"></dd>\n\
         <dt>Date</dt><dd>{date}</dd>\n\
         </div>\n",
        name = escape_html(&block.name),
        position = escape_html(&block.position),
        src = block.signature.to_data_url(),
        date = escape_html(&block.date_text),
    )
}

/// Render the contract as a standalone printable HTML page. A signed form
/// prints its frozen values and signature block; an unsigned one prints the
/// current values and an "unsigned" note.
pub fn render_document_html(form: &FormController) -> String {
    let mut html = String::new();
    html.push_str("<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n");
    html.push_str(&format!("<title>{}</title>\n", DOCUMENT_TITLE));
    html.push_str(&format!("<style>\n{}</style>\n", PRINT_CSS));
    html.push_str("</head>\n<body>\n");
    html.push_str(&format!("<h1>{}</h1>\n", DOCUMENT_TITLE));

    for (heading, ids) in DOCUMENT_SECTIONS {
        html.push_str(&format!("<h2>{}</h2>\n<dl>\n", heading));
        for &id in ids {
            let class = if id.is_multiline() { " class=\"multiline\"" } else { "" };
            html.push_str(&format!(
                "<dt>{}</dt><dd{}>{}</dd>\n",
                escape_html(id.label()),
                class,
                escape_html(&field_text(form, id))
            ));
        }
        html.push_str("</dl>\n");
    }

    html.push_str(&format!("<h2>{}</h2>\n", SIGNER_SECTION.0));
    match form.signed_document() {
        Some(doc) => html.push_str(&render_signature(&doc.signature)),
        None => html.push_str("<p class=\"unsigned\">Not yet signed.</p>\n"),
    }
    html.push_str("</body>\n</html>\n");
    html
}

/// Directory for the printable page.
pub fn print_dir() -> PathBuf {
    std::env::temp_dir().join("signpad-print")
}

pub fn write_print_file(dir: &Path, html: &str) -> Result<PathBuf> {
    fs::create_dir_all(dir)?;
    let path = dir.join("contract.html");
    fs::write(&path, html)?;
    Ok(path)
}

/// Write the printable page and hand it to the system browser, where the
/// user prints it.
pub fn open_for_printing(form: &FormController) -> Result<PathBuf> {
    let path = write_print_file(&print_dir(), &render_document_html(form))?;
    open::that(&path)?;
    info!(path = %path.display(), "opened contract for printing");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::domain::form::Requirement;
    use crate::app::domain::stroke::Snapshot;
    use chrono::NaiveDate;

    fn signed_form() -> FormController {
        let date = NaiveDate::from_ymd_opt(2024, 6, 2).unwrap();
        let mut form = FormController::with_date(date);
        for id in FieldId::ALL {
            if id.requirement() == Requirement::Required {
                form.set_value(id, "x");
            }
        }
        form.set_value(FieldId::ProjectTitle, "Kitchen <refit> & extension");
        form.set_value(FieldId::ClientName, "Jane O'Neil");
        form.set_value(FieldId::ClientPosition, "Owner");
        form.set_confirmation(FieldId::ClientName, true);
        form.set_confirmation(FieldId::ClientPosition, true);
        form.submit(Some(&Snapshot::new(vec![0x89, b'P', b'N', b'G'], 4, 4)), date)
            .unwrap();
        form
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html("a<b>&\"c'"), "a&lt;b&gt;&amp;&quot;c&#39;");
        assert_eq!(escape_html("plain"), "plain");
    }

    #[test]
    fn test_signed_document_html() {
        let html = render_document_html(&signed_form());
        assert!(html.contains("Kitchen &lt;refit&gt; &amp; extension"));
        assert!(html.contains("<img src=\"data:image/png;base64,iVBORw==\" alt=\"Jane O&#39;Neil Signature\">"));
        assert!(html.contains("2nd June 2024"));
        assert!(html.contains("<dd class=\"multiline\">x</dd>"));
        assert!(!html.contains("Not yet signed"));
    }

    #[test]
    fn test_unsigned_document_html() {
        let form = FormController::new();
        let html = render_document_html(&form);
        assert!(html.contains("Not yet signed."));
        assert!(html.contains("[Not provided]"));
    }

    #[test]
    fn test_write_print_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_print_file(&dir.path().join("out"), "<html></html>").unwrap();
        assert_eq!(fs::read_to_string(path).unwrap(), "<html></html>");
    }
}
