pub mod xss;
