pub mod city;
pub mod enums;
pub mod event;
pub mod post;
pub mod user;
