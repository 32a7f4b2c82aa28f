fn main() {
    robot_dressup::run();
}
