mod exec;
mod print;

pub use exec::exec;
pub use print::print;
