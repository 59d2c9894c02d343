pub mod delivery;
pub mod note;

pub use delivery::{Delivery, NewDelivery, RescheduleRequest};
pub use note::{NewNote, Note};
