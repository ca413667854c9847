pub mod a001_artist;
pub mod a002_space;
pub mod a003_user_profile;
pub mod common;
