pub mod app;
pub mod header;
pub mod loading_spinner;
pub mod media_modal;
pub mod postcard;
pub mod slideshow_view;
