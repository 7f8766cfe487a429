mod central_panel;
mod template_panel;
mod tools_panel;

pub use central_panel::central_panel;
pub use template_panel::template_panel;
pub use tools_panel::tools_panel;
