mod analytics;
mod group;
mod marketplace;
mod notification;
mod role;
mod social;
mod tracking;
mod user;
