//! Schedule extraction from announcement pages.
//!
//! Observed layouts:
//! - a table of `14:00-15:00 | 3, 4 та 5 черги` rows
//! - a table or paragraphs of `4.ІІ | 08:00-09:30, 16:30-20:00` rows
//!
//! Both table and paragraph rows are collected; a page may carry both.

use crate::error::Result;
use crate::models::{AnnouncementId, Page, Row, is_period_code, normalize_label};
use crate::services::Document;
use crate::utils::{announcement_id_of, normalize_whitespace};

/// Parse an announcement page into its id and schedule.
///
/// The id comes from the document's own `/news/<id>` path; any other path is
/// a structural error.
pub fn parse_announcement(document: &Document) -> Result<(AnnouncementId, Page)> {
    let id = announcement_id_of(document.url())?;
    let title = document.text("title")?;

    let mut rows = table_rows(document)?;
    let table_count = rows.len();
    rows.extend(paragraph_rows(document)?);

    log::debug!(
        "Announcement {id}: {table_count} table rows, {} paragraph rows",
        rows.len() - table_count
    );

    Ok((id, Page::new(title, rows)))
}

/// Pair up table cells as `(label, value)`.
///
/// An odd trailing cell is dropped, as are pairs whose label is neither a
/// clock range nor a period code (headers, notes).
fn table_rows(document: &Document) -> Result<Vec<Row>> {
    let cells = document.texts("td")?;
    Ok(cells
        .chunks_exact(2)
        .filter_map(|pair| {
            let label = normalize_label(&pair[0])?;
            Some(Row::new(label, normalize_whitespace(&pair[1])))
        })
        .collect())
}

fn paragraph_rows(document: &Document) -> Result<Vec<Row>> {
    Ok(document
        .texts("p")?
        .iter()
        .filter_map(|text| paragraph_row(text))
        .collect())
}

/// Read a `4.ІІ: 08:00-09:30, 16:30-20:00` paragraph as a row.
///
/// The text before the first space, less one trailing colon, must be a
/// period code; anything else is narrative text.
pub fn paragraph_row(text: &str) -> Option<Row> {
    let (label, rest) = text.trim().split_once(char::is_whitespace)?;
    let label = label.strip_suffix(':').unwrap_or(label);
    if !is_period_code(label) {
        return None;
    }
    Some(Row::new(label, normalize_whitespace(rest)))
}

#[cfg(test)]
mod tests {
    use url::Url;

    use super::*;
    use crate::error::AppError;

    fn document(path: &str, body: &str) -> Document {
        let url = Url::parse("https://cherkasyoblenergo.com/")
            .unwrap()
            .join(path)
            .unwrap();
        Document::parse(url, body)
    }

    #[test]
    fn test_hourly_table() {
        let doc = document(
            "/news/2001",
            r#"<html><head><title>Графік погодинних відключень на 5 грудня</title></head>
            <body><table>
              <tr><td>Година</td><td>Черги</td></tr>
              <tr><td>14:00-15:00</td><td>3, 4 та 5 черги</td></tr>
              <tr><td>15:00 – 16:00</td><td>4 та 5
                черги</td></tr>
              <tr><td>примітка</td></tr>
            </table></body></html>"#,
        );

        let (id, page) = parse_announcement(&doc).unwrap();
        assert_eq!(id, 2001);
        assert_eq!(page.title, "Графік погодинних відключень на 5 грудня");
        assert_eq!(
            page.rows,
            vec![
                Row::new("14:00-15:00", "3, 4 та 5 черги"),
                Row::new("15:00-16:00", "4 та 5 черги"),
            ]
        );
    }

    #[test]
    fn test_odd_cell_dropped() {
        let doc = document(
            "/news/1",
            "<table><tr><td>10:00-11:00</td><td>1 черга</td><td>11:00-12:00</td></tr></table>",
        );
        let (_, page) = parse_announcement(&doc).unwrap();
        assert_eq!(page.rows, vec![Row::new("10:00-11:00", "1 черга")]);
    }

    #[test]
    fn test_paragraph_rows() {
        let doc = document(
            "/news/2002",
            r#"<title>ГПВ</title>
            <p>Шановні споживачі! Графік діятиме з 08:00.</p>
            <p>4.ІІ: 08:00-09:30, 16:30-20:00</p>
            <p>2.2 09:00 - 13:00, 15:00 - 18:00</p>"#,
        );

        let (_, page) = parse_announcement(&doc).unwrap();
        assert_eq!(
            page.rows,
            vec![
                Row::new("4.ІІ", "08:00-09:30, 16:30-20:00"),
                Row::new("2.2", "09:00 - 13:00, 15:00 - 18:00"),
            ]
        );
    }

    #[test]
    fn test_table_rows_precede_paragraph_rows() {
        let doc = document(
            "/news/3",
            r#"<p>1.I: 00:00-04:00</p>
            <table><tr><td>1.II</td><td>04:00-08:00</td></tr></table>"#,
        );
        let (_, page) = parse_announcement(&doc).unwrap();
        let labels: Vec<_> = page.rows.iter().map(|r| r.label.as_str()).collect();
        assert_eq!(labels, vec!["1.II", "1.I"]);
    }

    #[test]
    fn test_paragraph_row_shape() {
        assert_eq!(
            paragraph_row("4.ІІ: 08:00-09:30, 16:30-20:00"),
            Some(Row::new("4.ІІ", "08:00-09:30, 16:30-20:00"))
        );
        assert_eq!(
            paragraph_row("3.1 10:00-12:00"),
            Some(Row::new("3.1", "10:00-12:00"))
        );
        assert_eq!(paragraph_row("Шановні споживачі!"), None);
        assert_eq!(paragraph_row("4.ІІ:"), None);
        assert_eq!(paragraph_row("14.2: 10:00-12:00"), None);
        assert_eq!(paragraph_row("4-2: 10:00-12:00"), None);
    }

    #[test]
    fn test_non_news_path_is_fatal() {
        let doc = document("/news/latest", "<title>x</title>");
        assert!(matches!(
            parse_announcement(&doc),
            Err(AppError::Structure { .. })
        ));
    }
}
