pub mod fever;
pub mod hit_window;
pub mod judgement;
pub mod objects;
pub mod policy;
pub mod processor;
pub mod session;
