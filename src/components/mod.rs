pub mod emotion_dome;
