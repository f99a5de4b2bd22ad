use color_eyre::eyre::Report;

use crate::error::Failure;

/// One rendered result panel: a title, a one-line description, and
/// label/value rows. Every CLI action produces exactly one panel, success or
/// failure alike.
#[derive(Debug, Clone)]
pub struct Panel {
    title: String,
    description: String,
    rows: Vec<(String, String)>,
}

impl Panel {
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            rows: Vec::new(),
        }
    }

    pub fn row(mut self, label: impl Into<String>, value: impl Into<String>) -> Self {
        self.rows.push((label.into(), value.into()));
        self
    }

    pub fn rows(&self) -> &[(String, String)] {
        &self.rows
    }

    /// Print the panel to stdout.
    pub fn render(&self) {
        println!("== {} ==", self.title);
        println!("{}", self.description);
        let width = self
            .rows
            .iter()
            .map(|(label, _)| label.len())
            .max()
            .unwrap_or(0);
        for (label, value) in &self.rows {
            println!("  {label:<width$} : {value}");
        }
        println!();
    }
}

/// Build the error panel for a failed action. The failure taxonomy is shown
/// as part of the value so reverts, timeouts, and bad input read differently.
pub fn failure_panel(title: &str, description: &str, err: &Report) -> Panel {
    let failure = err
        .downcast_ref::<Failure>()
        .cloned()
        .unwrap_or_else(|| Failure::from_rpc("request", err));
    Panel::new(title, description).row("Error", failure.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use color_eyre::eyre::eyre;

    #[test]
    fn test_panel_rows_accumulate() {
        let panel = Panel::new("Title", "Desc")
            .row("A", "1")
            .row("B", "2");
        assert_eq!(panel.rows().len(), 2);
        assert_eq!(panel.rows()[0], ("A".to_string(), "1".to_string()));
    }

    #[test]
    fn test_failure_panel_preserves_taxonomy() {
        let err: Report = Failure::BadInput("bad amount".to_string()).into();
        let panel = failure_panel("Insurance", "Buy insurance", &err);
        assert_eq!(panel.rows().len(), 1);
        assert_eq!(panel.rows()[0].1, "bad input: bad amount");
    }

    #[test]
    fn test_failure_panel_keeps_domain_failures_out_of_network_bucket() {
        let err: Report =
            Failure::BadInput("no airline is registered on 0x0a; seed the contract first".into())
                .into();
        let panel = failure_panel("Accounts", "roster", &err);
        assert!(panel.rows()[0].1.starts_with("bad input"));
    }

    #[test]
    fn test_failure_panel_classifies_plain_reports() {
        let err = eyre!("execution reverted: not funded");
        let panel = failure_panel("Airlines", "Register", &err);
        assert!(panel.rows()[0].1.starts_with("contract revert"));
    }

    #[test]
    fn test_failure_panel_unclassified_is_network() {
        let err = eyre!("connection reset by peer");
        let panel = failure_panel("Status", "Check", &err);
        assert!(panel.rows()[0].1.starts_with("network error"));
    }
}
