pub mod countdown_view;
pub mod intro;
pub mod month_view;
pub mod world_clock_view;

pub use countdown_view::CountdownView;
pub use intro::IntroView;
pub use month_view::MonthView;
pub use world_clock_view::WorldClockView;
