// Game-side code: the player core plus the demo level and respawn flow around it

pub mod level;
pub mod player;
pub mod respawn;
