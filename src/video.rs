pub const VIDEO_SELECTOR: &str = ".main-video";
pub const WRAPPER_SELECTOR: &str = ".main-video-wrapper";
pub const OVERLAY_SELECTOR: &str = ".play-overlay";
pub const PLAYING_CLASS: &str = "playing";

/// Media element plus the marker class that hides its overlay.
pub trait Player {
    fn paused(&self) -> bool;
    fn play(&self);
    fn pause(&self);
    fn set_playing_marker(&self, playing: bool);
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Playback {
    Started,
    Paused,
}

/// Wrapper click: start a paused video, pause a running one.
pub fn toggle_playback(player: &impl Player) -> Playback {
    if player.paused() {
        player.play();
        player.set_playing_marker(true);
        Playback::Started
    } else {
        player.pause();
        player.set_playing_marker(false);
        Playback::Paused
    }
}

/// Natural end of playback; the media element has already stopped.
pub fn playback_ended(player: &impl Player) {
    player.set_playing_marker(false);
}
