mod chart_playback_tests;
mod config_tests;
mod property_tests;
mod record_loading_tests;
