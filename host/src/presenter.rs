use {crate::GuestValue, std::fmt};

/// Shown once the guest module has been instantiated.
pub const LOADED_MESSAGE: &str = "Guest module loaded successfully!";

/// A status line for the presenter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Status {
    /// The guest module was instantiated.
    Loaded,
    /// The guest module could not be fetched or instantiated. Carries the
    /// description of the underlying error.
    Failed(String),
    /// The guest module is loaded, but a call into it failed.
    CallFailed(String),
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Status::Loaded => f.write_str(LOADED_MESSAGE),
            Status::Failed(description) => write!(f, "Error: {description}"),
            Status::CallFailed(description) => write!(f, "Call failed: {description}"),
        }
    }
}

/// Renders what the session produces. Rendering itself is up to the
/// implementor; the session only decides what is shown and when.
pub trait Presenter {
    fn show_status(&mut self, status: &Status);

    fn show_result(&mut self, value: &GuestValue);
}
