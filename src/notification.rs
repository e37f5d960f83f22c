use crate::diff::{ChangeRow, RosterDiff};
use anyhow::{bail, Result};
use chrono::NaiveDate;

/// Notification prête à remettre au transport (SMTP ou autre, hors de la lib).
#[derive(Debug, Clone)]
pub struct Notice {
    pub staff: String,
    pub recipient: String,
    pub subject: String,
    pub body: String,
}

/// Permet de customiser le rendu de la table de changements (HTML, texte...).
pub trait NoticeRenderer {
    fn render(&self, rows: &[ChangeRow]) -> String;
}

/// Table HTML façon mail : Date / Previous Shift / New Shift.
#[derive(Debug, Default, Clone, Copy)]
pub struct HtmlTable;

impl NoticeRenderer for HtmlTable {
    fn render(&self, rows: &[ChangeRow]) -> String {
        let mut table = String::from(
            "<style>\ntable, tr, th, td {\n border: 1px solid black;\n border-collapse: collapse;\n text-align: center;\n}\n</style>\n<table>\n<tr><th style='width: 150px;'>Date</th><th style='width: 150px;'>Previous Shift</th><th style='width: 150px;'>New Shift</th></tr>\n",
        );
        for row in rows {
            table.push_str(&format!(
                "<tr><td>{}</td><td>{}</td><td>{}</td></tr>\n",
                row.date_key,
                row.previous.as_deref().unwrap_or("-"),
                row.current.as_deref().unwrap_or("-"),
            ));
        }
        table.push_str("</table>");
        table
    }
}

/// Rendu texte brut, une ligne par date.
#[derive(Debug, Default, Clone, Copy)]
pub struct PlainText;

impl NoticeRenderer for PlainText {
    fn render(&self, rows: &[ChangeRow]) -> String {
        let mut lines = vec![String::from("Date       | Previous | New")];
        for row in rows {
            lines.push(format!(
                "{} | {} | {}",
                row.date_key,
                row.previous.as_deref().unwrap_or("-"),
                row.current.as_deref().unwrap_or("-"),
            ));
        }
        lines.join("\n")
    }
}

/// Assemble la notification d'une personne à partir d'un diff.
///
/// Échoue si le diff ne contient aucun changement : rien à annoncer.
pub fn prepare_notice(
    staff: &str,
    recipient: &str,
    diff: &RosterDiff,
    roster_url: Option<&str>,
    today: NaiveDate,
    renderer: &dyn NoticeRenderer,
) -> Result<Notice> {
    if diff.is_unchanged() {
        bail!("no roster changes for {staff}, nothing to notify");
    }

    let mut body = format!("Hey, {staff}!");
    body.push_str(
        "<br><br>The roster has been updated recently and your upcoming shifts have changed!\
         <br><br>Below is a table of your upcoming shifts and the aforementioned changes:<br><br>",
    );
    body.push_str(&renderer.render(diff.rows()));
    if let Some(url) = roster_url {
        body.push_str(
            "<br>If you want to double-check these shifts, please see the current version of the roster here:",
        );
        body.push_str(&format!("<br><a href='{url}'>{url}</a>"));
    }

    Ok(Notice {
        staff: staff.to_string(),
        recipient: recipient.to_string(),
        subject: format!("Latest Roster {}", today.format("%Y%m%d")),
        body,
    })
}
