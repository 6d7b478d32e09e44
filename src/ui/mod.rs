pub mod chat_loop;
pub mod renderer;
pub mod state;
pub mod text_wrapping;
pub mod theme;
pub mod toasts;
