//! UI Components
//!
//! Screens of the admin UI and the list building blocks they share.

mod activity_tab;
mod cash_tab;
mod component_tab;
mod delete_confirm_button;
mod export_buttons;
mod filter_bar;
mod group_detail;
mod group_list;
mod group_modal;
mod laporan_tab;
mod list_controls;
mod log_panel;
mod login_form;
mod member_tab;
mod multi_select;
mod nav_bar;
mod pagination;
mod product_tab;
mod region_select;
mod remote_list;
mod report_feed;
mod sort_header;
mod toast;

pub use group_detail::GroupDetail;
pub use group_list::GroupList;
pub use login_form::LoginForm;
pub use nav_bar::NavBar;
pub use report_feed::ReportFeed;
pub use toast::ToastHost;
