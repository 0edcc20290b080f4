fn main() {
    tilebox::start();
}
