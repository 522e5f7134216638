pub mod sluggify;
