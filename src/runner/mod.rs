pub mod capture;
pub mod console;
pub mod invoker;
pub mod reporter;

pub use capture::OutputCapture;
pub use console::ConsoleReporter;
pub use invoker::{InvocationOutcome, InvokeError, ProcessInvoker, SuiteInvoker};
pub use reporter::TestRunReporter;
