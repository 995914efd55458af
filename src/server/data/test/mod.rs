mod analytics;
mod group;
mod health_log;
mod marketplace_item;
mod notification;
mod post;
