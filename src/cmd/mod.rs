/*!
Command layer.

  command.rs   Command enum, arity, default arguments, usage text
  validate.rs  positional-word validation -> Invocation
  extract.rs   record -> summary line formatting
  dispatch.rs  Dispatcher (collaborator call + extractor), file re-dispatch
  error.rs     CommandError (user-facing dispatch failures)
  report.rs    human / JSON rendering of outcomes
  run.rs       execute(): runtime + dispatcher + printing for main.rs
*/

pub mod command;
pub mod dispatch;
pub mod error;
pub mod extract;
pub mod report;
pub mod run;
pub mod validate;

pub use command::USAGE;
pub use report::print_invalid_arguments;
pub use run::execute;
pub use validate::parse_invocation;
