mod html;
mod panels;
mod table;

pub use html::{
    escape_html, fill_template, href, load_template, message_banner, render_dashboard,
    status_banner,
};
pub use panels::{
    render_action_panel, render_list_panel, render_search_panel, PageContext, SearchMode,
    SearchQuery,
};
pub use table::TableState;
