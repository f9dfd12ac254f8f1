// Terminal front end: the listing table and the interactive menu.
pub mod menu;
pub mod table;
