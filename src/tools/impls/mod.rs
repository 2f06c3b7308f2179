mod draft_email;
mod message_fields;
mod send_email;

pub use draft_email::DraftEmailTool;
pub use send_email::SendEmailTool;
