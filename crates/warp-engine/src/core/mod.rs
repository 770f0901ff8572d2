pub mod rng;
pub mod clock;
pub mod frame_loop;
pub mod view_state;
pub mod unlock;
pub mod director;
