use {
    colored::Colorize,
    hello_host::{GuestValue, Presenter, Status},
    std::io::{self, Stdout, Write},
};

/// Prints statuses and guest results, one per line.
pub struct TerminalPresenter<W = Stdout> {
    out: W,
}

impl TerminalPresenter {
    pub fn stdout() -> Self {
        Self { out: io::stdout() }
    }
}

impl<W> TerminalPresenter<W>
where
    W: Write,
{
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    // A broken stdout has nowhere left to be reported, so write errors are
    // only logged.
    fn print(&mut self, line: impl std::fmt::Display) {
        if let Err(err) = writeln!(self.out, "{line}") {
            tracing::warn!(%err, "failed to write to terminal");
        }
    }
}

impl<W> Presenter for TerminalPresenter<W>
where
    W: Write,
{
    fn show_status(&mut self, status: &Status) {
        let line = match status {
            Status::Loaded => status.to_string().green(),
            Status::Failed(_) => status.to_string().red().bold(),
            Status::CallFailed(_) => status.to_string().yellow(),
        };
        self.print(line);
    }

    fn show_result(&mut self, value: &GuestValue) {
        self.print(format!("{} {}", "Guest returned:".bold(), value));
    }
}

// ----------------------------------- tests -----------------------------------

#[cfg(test)]
mod tests {
    use {super::*, hello_host::LOADED_MESSAGE};

    fn render(action: impl FnOnce(&mut TerminalPresenter<Vec<u8>>)) -> String {
        colored::control::set_override(false);

        let mut presenter = TerminalPresenter::new(Vec::new());
        action(&mut presenter);

        String::from_utf8(presenter.into_inner()).unwrap()
    }

    #[test]
    fn prints_statuses() {
        let out = render(|p| {
            p.show_status(&Status::Loaded);
            p.show_status(&Status::Failed("module not found".into()));
        });

        assert_eq!(out, format!("{LOADED_MESSAGE}\nError: module not found\n"));
    }

    #[test]
    fn prints_results_verbatim() {
        let out = render(|p| {
            p.show_result(&GuestValue::Text("Hello from Rust!".into()));
            p.show_result(&GuestValue::Number(-3));
        });

        assert_eq!(out, "Guest returned: Hello from Rust!\nGuest returned: -3\n");
    }
}
