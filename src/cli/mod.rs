pub mod app;
pub mod commands;
pub mod compile;
pub mod context;
pub mod dispatch;
pub mod env;
pub mod output;
pub mod perform;
pub mod runtime;

pub use app::run;
pub use compile::{cmd_compile, CompileArgs};
pub use perform::{cmd_perform, PerformArgs};
