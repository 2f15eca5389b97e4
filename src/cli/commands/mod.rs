mod check;
mod externalize;
mod helper;
mod init;

pub use check::check;
pub use externalize::externalize;
pub use init::init;
