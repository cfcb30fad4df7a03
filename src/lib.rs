/*
Stagelight - by David Petnick
*/
pub mod accordion;
pub mod audio;
pub mod catalog;
pub mod motion;
pub mod options;
pub mod particles;
pub mod scene;
pub mod view;
