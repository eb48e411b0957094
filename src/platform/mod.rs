// External collaborators: the camera and the pose model

pub mod capture;
pub mod pose;
