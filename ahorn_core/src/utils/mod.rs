//! Small display helpers shared by the services and the command line.

pub mod format;

pub use format::{
    format_attachment_tag, format_file_size, format_file_size_with, format_number,
    resolve_attachment, ResolvedAttachment,
};
