#![allow(dead_code)]

pub mod mock_scene;
pub mod synthetic_image;
