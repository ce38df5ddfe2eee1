//! Page-level tests driving the router in process over the in-memory store

mod common;

mod authors;
mod books;
mod genres;
mod home;
