mod camera_check;
