pub mod confirm;
pub mod form;
pub mod table;

pub use confirm::{ConfirmOutcome, DeleteConfirm};
pub use form::{FormField, FormModal, SelectOption};
pub use table::{Column, EditAction, Table};
