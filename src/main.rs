fn main() {
    bevy_asteroids::game::run();
}
