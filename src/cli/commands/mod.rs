mod config;
mod episode;
mod output;
mod video;

pub use config::{cmd_config_init, cmd_config_show, cmd_config_validate};
pub use episode::{
    cmd_episode_create, cmd_episode_delete, cmd_episode_generate_assets,
    cmd_episode_generate_cuts, cmd_episode_generate_script, cmd_episode_list, cmd_episode_publish,
    cmd_episode_show, cmd_episode_status,
};
pub use video::{cmd_video_list, cmd_video_render, cmd_video_status, cmd_video_wait};
