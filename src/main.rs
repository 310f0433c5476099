fn main() {
    waitqueue::app::startup::startup();
}
