mod deploy;
mod doctor;
mod status;
mod telemetry;

pub use deploy::deploy;
pub use doctor::doctor;
pub use status::status;
pub use telemetry::telemetry;
