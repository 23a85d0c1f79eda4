pub mod sw;
