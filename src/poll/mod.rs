pub mod scheduler;

pub use scheduler::{poll_all_sensors, poll_room_sensors, poll_sensor_types, PollHandle};
