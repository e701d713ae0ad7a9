//! Sound cues for game events
//!
//! Turns simulation events into play/stop commands with final volumes.
//! Playing them is up to whatever audio backend the host has.

use crate::settings::Settings;
use crate::sim::GameEvent;
use crate::tuning::Tuning;

/// Background track
pub const MUSIC_ASSET: &str = "bgmusic.mp3";
/// Explosion sound
pub const EXPLOSION_ASSET: &str = "explode.mp3";

/// Something for the audio backend to do
#[derive(Debug, Clone, PartialEq)]
pub enum SoundCommand {
    /// Play a one-shot effect. `restart` rewinds a voice already playing it.
    Play {
        asset: String,
        volume: f32,
        restart: bool,
    },
    /// Start the looping background track from the beginning
    StartMusic { asset: String, volume: f32 },
    /// Stop the background track and rewind it
    StopMusic,
}

/// Maps events to sound commands
pub struct SoundBoard {
    player_shot: String,
    enemy_shots: Vec<String>,
}

impl SoundBoard {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            player_shot: tuning.player.shoot_sound.clone(),
            enemy_shots: tuning.enemies.types.iter().map(|t| t.sound.clone()).collect(),
        }
    }

    /// Sound commands for one event, if any
    pub fn cue(&self, event: &GameEvent, settings: &Settings) -> Option<SoundCommand> {
        let command = match event {
            GameEvent::RunStarted => SoundCommand::StartMusic {
                asset: MUSIC_ASSET.into(),
                volume: settings.effective_volume(settings.music_volume),
            },
            GameEvent::GameOver { .. } => return Some(SoundCommand::StopMusic),
            GameEvent::PlayerFired => SoundCommand::Play {
                asset: self.player_shot.clone(),
                volume: settings.effective_sfx_volume(settings.bullet_volume),
                restart: true,
            },
            GameEvent::EnemyFired { kind } => SoundCommand::Play {
                asset: self.enemy_shots.get(*kind)?.clone(),
                volume: settings.effective_sfx_volume(settings.bullet_volume),
                restart: true,
            },
            GameEvent::Explosion { .. } => SoundCommand::Play {
                asset: EXPLOSION_ASSET.into(),
                volume: settings.effective_sfx_volume(settings.explosion_volume),
                restart: false,
            },
            _ => return None,
        };

        // Silent commands aren't worth sending
        if settings.muted {
            return None;
        }
        Some(command)
    }

    /// Sound commands for a frame's worth of events, in order
    pub fn cues(&self, events: &[GameEvent], settings: &Settings) -> Vec<SoundCommand> {
        events
            .iter()
            .filter_map(|e| self.cue(e, settings))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    fn board() -> SoundBoard {
        SoundBoard::new(&Tuning::default())
    }

    #[test]
    fn test_shots_use_bullet_volume() {
        let settings = Settings::default();
        let cue = board().cue(&GameEvent::PlayerFired, &settings);
        assert_eq!(
            cue,
            Some(SoundCommand::Play {
                asset: "heroes/h1.mp3".into(),
                volume: 0.2,
                restart: true,
            })
        );

        let cue = board().cue(&GameEvent::EnemyFired { kind: 2 }, &settings);
        assert!(matches!(cue, Some(SoundCommand::Play { ref asset, .. }) if asset == "enemies/e3.mp3"));
    }

    #[test]
    fn test_sfx_volume_leaves_music_alone() {
        let settings = Settings {
            sfx_volume: 0.5,
            ..Default::default()
        };
        let events = [
            GameEvent::RunStarted,
            GameEvent::Explosion {
                pos: Vec2::ZERO,
                size: 40.0,
            },
        ];
        let cues = board().cues(&events, &settings);
        assert!(matches!(cues[0], SoundCommand::StartMusic { volume, .. } if volume == 1.0));
        assert!(matches!(cues[1], SoundCommand::Play { volume, .. } if (volume - 0.1).abs() < 1e-6));
    }

    #[test]
    fn test_music_follows_run() {
        let settings = Settings::default();
        let events = [
            GameEvent::RunStarted,
            GameEvent::EnemySpawned { id: 1, kind: 0 },
            GameEvent::Explosion {
                pos: Vec2::ZERO,
                size: 40.0,
            },
            GameEvent::GameOver { score: 0, kills: 0 },
        ];
        let cues = board().cues(&events, &settings);
        assert_eq!(cues.len(), 3);
        assert!(matches!(cues[0], SoundCommand::StartMusic { volume, .. } if volume == 1.0));
        assert!(matches!(cues[1], SoundCommand::Play { ref asset, .. } if asset == EXPLOSION_ASSET));
        assert_eq!(cues[2], SoundCommand::StopMusic);
    }

    #[test]
    fn test_muted_only_stops() {
        let settings = Settings {
            muted: true,
            ..Default::default()
        };
        let events = [
            GameEvent::RunStarted,
            GameEvent::PlayerFired,
            GameEvent::GameOver { score: 0, kills: 0 },
        ];
        assert_eq!(board().cues(&events, &settings), vec![SoundCommand::StopMusic]);
    }

    #[test]
    fn test_unknown_enemy_kind_is_silent() {
        let cue = board().cue(&GameEvent::EnemyFired { kind: 99 }, &Settings::default());
        assert_eq!(cue, None);
    }
}
