fn main() {
    mute::cli::run();
}
