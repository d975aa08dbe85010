pub mod colors;
pub mod debounce;
pub mod image_status;
pub mod interactive;
pub mod league_details;
pub mod league_list;
pub mod loading_indicator;
pub mod render;
pub mod selection;

pub use debounce::Debouncer;
pub use image_status::{ImageDisplay, ImageLoadStatus, ImageSlot};
pub use interactive::run_interactive_ui;
pub use league_details::LeagueDetailsView;
pub use league_list::{LeagueListModel, LeagueListView};
pub use selection::SeasonSelection;
