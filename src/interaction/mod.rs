pub mod inputmap;
pub mod pointer;
pub mod session;
