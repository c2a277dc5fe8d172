pub mod export;
pub mod import;
pub mod init;
pub mod shell;
pub mod show;

pub use export::{export, ExportArgs};
pub use import::{import, ImportArgs};
pub use init::{init, InitArgs};
pub use shell::{shell, ShellArgs};
pub use show::{show, ShowArgs};
