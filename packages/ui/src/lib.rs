//! Screens and shared components for the mobile app.
//!
//! Screens build their flow controllers from the [`client::ClientContext`] the
//! app shell provides, and render from controller state.

mod context;
pub use context::{use_client, use_session, InputFilePicker, WebviewRedirector};

mod home_feed;
pub use home_feed::HomeFeed;

mod player;
pub use player::Player;

mod upload_screen;
pub use upload_screen::UploadScreen;

mod dashboard;
pub use dashboard::DashboardScreen;

mod tip_result;
pub use tip_result::TipResult;

mod video_card;
pub use video_card::VideoCard;

mod tip_button;
pub use tip_button::TipButton;

mod comments;
pub use comments::CommentBox;

mod theme;
pub use theme::AppTheme;

mod toast;
pub use toast::{use_toasts, ToastProvider, Toasts};

mod i18n;
pub use i18n::{set_lang, t, use_lang, I18nProvider, Lang};
