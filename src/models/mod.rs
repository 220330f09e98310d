pub mod droplet_record;

pub use droplet_record::DropletRecord;
