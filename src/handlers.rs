pub mod squads;
