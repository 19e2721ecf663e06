pub mod frame_loop;
pub mod hierarchy;
pub mod scene;
pub mod time;
