pub mod dismiss;

pub use dismiss::AlertDismisser;
