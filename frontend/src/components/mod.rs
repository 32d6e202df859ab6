pub mod economy_badge;
pub mod navbar;
pub mod settings_modal;
