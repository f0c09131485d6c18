use foundry_core::{
    status_text, AppViewModel, PhaseSlot, PhaseState, ResultBody, ResultEntry, SessionState,
};

const RULE: &str = "----------------------------------------------------------------------";

/// Renders the whole view as one text block. The app reprints the block
/// whenever the state reports a visible change.
pub fn render(view: &AppViewModel) -> String {
    let mut out = String::new();
    out.push_str(RULE);
    out.push('\n');
    out.push_str(&header_line(view));
    out.push('\n');

    if let Some(notice) = &view.status {
        out.push_str("status: ");
        out.push_str(&status_text(notice));
        out.push('\n');
    } else if view.session == SessionState::Complete {
        out.push_str("status: analysis complete\n");
    }
    if let Some(at) = &view.last_checked {
        out.push_str("last checked: ");
        out.push_str(at);
        out.push('\n');
    }

    if view.phases.iter().any(|slot| slot.state != PhaseState::Idle) {
        out.push('\n');
        for slot in &view.phases {
            out.push_str(&phase_line(slot));
        }
    }

    if !view.results.is_empty() {
        out.push('\n');
        out.push_str(&format!("results ({}):\n", view.results.len()));
        for entry in &view.results {
            out.push_str(&entry_lines(entry));
        }
    }
    out
}

fn header_line(view: &AppViewModel) -> String {
    let busy = if view.busy { " [busy]" } else { "" };
    format!(
        "session: {}{} | ideas: {} ({} link(s))",
        session_label(view.session),
        busy,
        view.idea_count,
        view.link_count
    )
}

fn session_label(session: SessionState) -> &'static str {
    match session {
        SessionState::Idle => "idle",
        SessionState::Submitting => "submitting",
        SessionState::Polling => "polling",
        SessionState::Complete => "complete",
        SessionState::Exhausted => "stopped checking",
        SessionState::Failed => "failed",
    }
}

fn phase_line(slot: &PhaseSlot) -> String {
    let marker = match slot.state {
        PhaseState::Idle => "[ ]",
        PhaseState::Active => "[>]",
        PhaseState::Complete => "[x]",
        PhaseState::Error => "[!]",
    };
    let mut line = format!("  {} {}", marker, slot.phase.label());
    if let Some(last) = slot.messages.last() {
        line.push_str(" - ");
        line.push_str(last);
    }
    line.push('\n');
    line
}

fn entry_lines(entry: &ResultEntry) -> String {
    match &entry.body {
        ResultBody::Success(artifacts) => format!(
            "  {} ok   {}\n           files: {}, {}\n",
            entry.id,
            excerpt(&artifacts.strategy, 60),
            artifacts.strategy_file,
            artifacts.backtest_file
        ),
        ResultBody::Error { message } => {
            format!("  {} err  {}\n", entry.id, excerpt(message, 60))
        }
    }
}

/// First line of the text, truncated to at most `max_chars` characters.
fn excerpt(text: &str, max_chars: usize) -> String {
    let first_line = text.lines().next().unwrap_or("");
    let mut out: String = first_line.chars().take(max_chars).collect();
    if first_line.chars().count() > max_chars {
        out.push_str("...");
    }
    out
}

#[cfg(test)]
mod tests {
    use foundry_core::{PhaseId, StatusNotice, StrategyArtifacts, WaitFlavor};

    use super::*;

    fn slot(phase: PhaseId, state: PhaseState, messages: &[&str]) -> PhaseSlot {
        PhaseSlot {
            phase,
            state,
            messages: messages.iter().map(|m| (*m).to_string()).collect(),
        }
    }

    #[test]
    fn excerpt_keeps_the_first_line_and_truncates_on_char_boundaries() {
        assert_eq!(excerpt("short", 60), "short");
        assert_eq!(excerpt("first\nsecond", 60), "first");
        assert_eq!(excerpt("äöü äöü", 3), "äöü...");
    }

    #[test]
    fn waiting_view_shows_status_and_attempt() {
        let view = AppViewModel {
            session: SessionState::Polling,
            busy: true,
            idea_count: 2,
            link_count: 1,
            retry_count: 2,
            status: Some(StatusNotice::Waiting {
                attempt: 2,
                flavor: WaitFlavor::EmptyResults,
            }),
            ..AppViewModel::default()
        };
        let text = render(&view);
        assert!(text.contains("session: polling [busy]"));
        assert!(text.contains("ideas: 2 (1 link(s))"));
        assert!(text.contains("attempt 2 of 10"));
    }

    #[test]
    fn phase_lines_mark_states_and_show_the_latest_message() {
        let view = AppViewModel {
            phases: vec![
                slot(PhaseId::Research, PhaseState::Complete, &["done"]),
                slot(PhaseId::Backtest, PhaseState::Active, &["one", "two"]),
                slot(PhaseId::Debug, PhaseState::Idle, &[]),
            ],
            ..AppViewModel::default()
        };
        let text = render(&view);
        assert!(text.contains("[x] Research - done"));
        assert!(text.contains("[>] Backtest - two"));
        assert!(text.contains("[ ] Debug\n"));
    }

    #[test]
    fn result_rows_render_success_and_error_shapes() {
        let view = AppViewModel {
            session: SessionState::Complete,
            results: vec![
                ResultEntry::new(
                    1,
                    ResultBody::Success(StrategyArtifacts {
                        link: "https://example.com".to_string(),
                        strategy: "Breakout over the 20 day high".to_string(),
                        backtest: "class Breakout(Strategy): ...".to_string(),
                        strategy_file: "strategy_1.txt".to_string(),
                        backtest_file: "backtest_1.py".to_string(),
                    }),
                ),
                ResultEntry::new(
                    2,
                    ResultBody::Error {
                        message: "transcript unavailable".to_string(),
                    },
                ),
            ],
            ..AppViewModel::default()
        };
        let text = render(&view);
        assert!(text.contains("status: analysis complete"));
        assert!(text.contains("results (2):"));
        assert!(text.contains("strategy-1 ok   Breakout over the 20 day high"));
        assert!(text.contains("files: strategy_1.txt, backtest_1.py"));
        assert!(text.contains("strategy-2 err  transcript unavailable"));
    }
}
