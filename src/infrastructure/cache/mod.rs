mod memory;
mod redis_counter;

pub use memory::InMemorySlugCounterCache;
pub use redis_counter::RedisSlugCounterCache;
