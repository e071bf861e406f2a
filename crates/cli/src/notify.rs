use console::style;
use ui::Notifier;

/// Prints user-facing input errors to stderr, standing in for a browser alert.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn notify(&self, message: &str) {
        eprintln!("{} {message}", style("!").red().bold());
    }
}
